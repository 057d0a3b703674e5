mod rendered_index;

pub use rendered_index::RenderedIndex;
