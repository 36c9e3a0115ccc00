// src/matches/tests/mod.rs

mod validators_tests;
