use indexmap::IndexMap;

/// Bundled league presets, in listing order.
pub fn builtin_presets() -> IndexMap<&'static str, &'static str> {
    IndexMap::from([
        (
            "efl_fatigue",
            include_str!("../content/presets/efl_fatigue.json"),
        ),
        (
            "efl_budget",
            include_str!("../content/presets/efl_budget.json"),
        ),
    ])
}
