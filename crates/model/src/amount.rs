use serde_with::{As, DisplayFromStr, PickFirst, Same};

/// Amounts are written as decimal strings, which keeps values above 2^53
/// exact for JSON consumers. Plain integers are still accepted on input.
pub(crate) type Decimal = As<PickFirst<(DisplayFromStr, Same)>>;
