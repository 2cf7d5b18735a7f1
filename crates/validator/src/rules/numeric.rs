//! Named rules for integer chains.

use crate::chain::Chain;

macro_rules! integer_rules {
    ($($ty:ty),*) => {
        $(
            impl<'n> Chain<'n, $ty> {
                /// At least `min`.
                pub fn min(self, min: $ty) -> Self {
                    self.must_rule(|v| *v >= min, None, &format!("min;{min}"))
                }

                /// At most `max`.
                pub fn max(self, max: $ty) -> Self {
                    self.must_rule(|v| *v <= max, None, &format!("max;{max}"))
                }

                /// Within `min..=max`.
                pub fn between(self, min: $ty, max: $ty) -> Self {
                    self.must_rule(
                        |v| (min..=max).contains(v),
                        None,
                        &format!("between;{min};{max}"),
                    )
                }

                pub fn in_array(self, items: &[$ty]) -> Self {
                    self.must_rule(|v| items.contains(v), None, "inArray")
                }

                pub fn not_in_array(self, items: &[$ty]) -> Self {
                    self.must_rule(|v| !items.contains(v), None, "notInArray")
                }
            }
        )*
    };
}

integer_rules!(i32, i64);
