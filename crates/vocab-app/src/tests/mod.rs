mod fakes;
mod fill_tests;
