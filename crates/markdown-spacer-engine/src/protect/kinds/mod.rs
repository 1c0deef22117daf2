//! # Protected-Region Kinds
//!
//! Each region type owns its delimiter knowledge. The tracker and the inline
//! scanner call these; they never hardcode a backtick or a `$$`.

pub mod block_quote;
pub mod code_fence;
pub mod code_span;
pub mod html;
pub mod link;
pub mod math;

pub use block_quote::BlockQuote;
pub use code_fence::{CodeFence, FenceKind, FenceMarker};
pub use code_span::CodeSpan;
pub use html::HtmlTag;
pub use link::LinkTarget;
pub use math::{MathBlock, MathLine};
