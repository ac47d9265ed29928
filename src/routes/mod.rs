mod history;
mod messages;
mod root;
mod scheduled;

pub use history::*;
pub use messages::*;
pub use root::*;
pub use scheduled::*;
