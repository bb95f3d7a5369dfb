mod console;
mod investigation;
mod persistence;
