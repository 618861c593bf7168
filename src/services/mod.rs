pub mod file_processor;
pub mod profiler;
pub mod samples;
