mod driver;
mod probe;
