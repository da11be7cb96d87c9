#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    SampleNow,
    CycleTheme,
    ToggleHelp,
    None,
}
