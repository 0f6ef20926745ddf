//! Template trees and rendering
//!
//! A template tree is a directory of files where every name ending in the
//! marker suffix (`.tmpl` by default) is a template. Rendering copies the tree
//! to a destination, substituting `{{ variable }}` placeholders in template
//! contents and in path segments that consist of exactly one placeholder.
//!
//! Trees come either from disk ([`TemplateNode::from_dir`]) or from the
//! templates compiled into this crate ([`TemplateNode::from_embedded`]).

mod context;
mod node;
mod render;

pub use context::SubstitutionContext;
pub use node::{is_renderable, FileSource, TemplateNode};
pub use render::{render_one, RenderedTree, Renderer};
