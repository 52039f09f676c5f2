mod auth_tests;
mod directory_tests;
