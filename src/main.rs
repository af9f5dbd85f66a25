// Dependencies are consumed through the library crate.
#![allow(unused_crate_dependencies)]

use git_lens::{App, init_logging};
use leptos::prelude::*;

fn main() {
	init_logging();
	mount_to_body(App);
}
