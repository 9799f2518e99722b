/// High-level response after a surface error.
///
/// The runtime loop turns [`Fatal`](Self::Fatal) into an application exit;
/// the other two resume on the next redraw.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM); terminate gracefully.
    Fatal,
}
