mod chatstream;

pub use chatstream::chatstream;
