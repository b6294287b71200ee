use proptest::prelude::*;

/// Unix start times inside a range wide enough to exercise both bounds
pub fn start_time_strategy() -> impl Strategy<Value = i64> {
    1i64..2_000_000_000
}

/// Optional bound; `None` is an unset side of the window
pub fn bound_strategy() -> impl Strategy<Value = Option<i64>> {
    prop_oneof![Just(None), start_time_strategy().prop_map(Some)]
}

/// Window bounds with `from <= to` whenever both are set
pub fn ordered_window_strategy() -> impl Strategy<Value = (Option<i64>, Option<i64>)> {
    (bound_strategy(), bound_strategy()).prop_map(|(a, b)| match (a, b) {
        (Some(x), Some(y)) => (Some(x.min(y)), Some(x.max(y))),
        other => other,
    })
}
