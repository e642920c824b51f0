mod common;
mod report;
mod visibility;
