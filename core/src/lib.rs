pub mod probe;
pub mod report;
pub mod resolver;
pub mod scanner;
pub mod scheduler;
pub mod vendors;
