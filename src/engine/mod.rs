pub mod feedback;
pub mod pipeline;
