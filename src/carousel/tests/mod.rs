//! Carousel controller tests

#[cfg(test)]
mod controller_tests;
