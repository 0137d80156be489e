mod decans_tests;
mod dignities_tests;
