/// Link and image targets: the `(...)` that follows `[text]` or `![alt]`.
///
/// The bracketed text is ordinary prose; only the target is protected.
pub struct LinkTarget;

impl LinkTarget {
    pub const TEXT_OPEN: u8 = b'[';
    pub const TEXT_CLOSE: u8 = b']';
    pub const OPEN: u8 = b'(';
    pub const CLOSE: u8 = b')';
}
