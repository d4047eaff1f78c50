mod common;
mod selection;
