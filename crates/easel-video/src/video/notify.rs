/// Outbound notifications published by the video core.
///
/// Queued on the context and drained by the host adapter after each entry point.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Published once, after a successful init.
    VideoInit,
    /// A new scale was applied; the whole scene should be redrawn.
    Repaint,
    /// The surface re-read its on-screen bounds.
    BoundsChanged,
}
