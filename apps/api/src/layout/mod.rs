// Layout Projector: document + template -> positioned visual tree.
// Pure and deterministic; re-run for every preview and export request.

pub mod blocks;
pub mod classic;
pub mod handlers;
pub mod modern;
pub mod placement;
pub mod projector;
pub mod timeline;
pub mod tree;
