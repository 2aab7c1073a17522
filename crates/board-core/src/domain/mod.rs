//! Domain entities - the core business objects.

mod category;
mod post;
mod writer;

pub use category::Category;
pub use post::Post;
pub use writer::Writer;
