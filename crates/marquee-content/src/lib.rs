//! Content resolution for marquee.
//!
//! Reads the docs trees of every locale into a [`ContentTree`] and resolves
//! them, together with the sidebar layout, into one [`DocGraph`] per
//! locale.

pub mod diagnostic;
pub mod graph;
pub mod order;
pub mod resolver;
pub mod tree;

pub use diagnostic::{DiagnosticKind, LinkDiagnostic};
pub use graph::{
    DocGraph, DocNode, LinkState, ResolvedCategory, ResolvedLink, ResolvedSidebar, SidebarEntry,
};
pub use resolver::{ContentResolver, Resolution, ResolveError};
pub use tree::{ContentError, ContentTree, SourceDoc};
