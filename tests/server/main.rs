mod helpers;

mod pages;
mod preflight_api;
