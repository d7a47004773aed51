mod common;
mod intake;
mod portfolio;
