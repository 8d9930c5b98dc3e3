mod home_tests;
mod search_tests;
