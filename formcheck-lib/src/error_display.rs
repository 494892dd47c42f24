/// Where a control should show a field's validation error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorDisplay {
    /// Show the message on its own line below the control (default).
    #[default]
    Below,
    /// Show the message next to the control.
    Inline,
    /// Don't show the message; the control only reflects the invalid state.
    None,
}
