pub mod functions;
pub mod translate;
