//! # vistazo-pages
//!
//! Page objects for the Vistazo acceptance-test harness. Each page object
//! owns its locators and interaction sequences and talks to the browser
//! only through the [`vistazo_browser::Driver`] trait, with explicit
//! bounded waits.

mod login;

pub use login::{
    LoginPage, DEFAULT_WAIT, ERROR_MESSAGE, INVENTORY_LIST, LOGIN_BUTTON, PASSWORD, USERNAME,
};
