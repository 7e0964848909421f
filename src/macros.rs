// \file src/macros.rs
//! macros for implementing the engine traits

/// Implement a `RadixMath` method of the full engine: load operands,
/// run the internal operation, check the status against the traps
macro_rules! impl_full_op {
    ($name:ident => $internal:ident ( $($arg:ident),* )) => {
        fn $name(&self, $($arg: &H::Number,)* ctx: &PrecisionContext) -> RadixResult<H::Number> {
            let mut flags = Flags::empty();
            let value = self.$internal($(&self.load($arg),)* ctx, &mut flags)?;
            self.finish(value, flags, ctx)
        }
    };
    ($name:ident => $internal:ident ( $($arg:ident),* ; $exponent:ident )) => {
        fn $name(&self, $($arg: &H::Number,)* $exponent: &BigInt, ctx: &PrecisionContext) -> RadixResult<H::Number> {
            let mut flags = Flags::empty();
            let value = self.$internal($(&self.load($arg),)* $exponent, ctx, &mut flags)?;
            self.finish(value, flags, ctx)
        }
    };
}

/// Forward `RadixMath` methods to the engine in field `$field`
macro_rules! forward_radix_math {
    ($field:ident; $( fn $name:ident ( $($arg:ident : $ty:ty),* ); )*) => {
        $(
            #[inline]
            fn $name(&self, $($arg: $ty,)* ctx: &PrecisionContext) -> RadixResult<H::Number> {
                self.$field.$name($($arg,)* ctx)
            }
        )*
    };
}

/// Forward `RadixMath` methods to the simplified engine or the full
/// engine, as the context asks
macro_rules! dispatch_radix_math {
    ($( fn $name:ident ( $($arg:ident : $ty:ty),* ); )*) => {
        $(
            #[inline]
            fn $name(&self, $($arg: $ty,)* ctx: &PrecisionContext) -> RadixResult<H::Number> {
                if ctx.is_simplified() {
                    self.simple.$name($($arg,)* ctx)
                } else {
                    self.simple.full().$name($($arg,)* ctx)
                }
            }
        )*
    };
}
