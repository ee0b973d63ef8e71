/// User intents raised by the UI, handled in one place by `RollCallApp::handle_action`
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiAction {
    /// Pick and show a new name
    Call,
    /// Re-read the names file from disk
    ReloadNames,
    /// Settings were edited; save them and apply what changed
    SettingsChanged,
    ToggleSettings,
    ToggleHistory,
    ClearHistory,
    DismissNotice,
    Minimize,
    Close,
    /// Move the undecorated window with the pointer
    DragWindow,
}
