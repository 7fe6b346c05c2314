#![allow(dead_code)]

use keyed_reconciler::{Block, Host, Renderer};
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static LOG_INIT: Once = Once::new();

pub fn init_tracing() {
	LOG_INIT.call_once(|| {
		//TODO: Fail on Warning or Error.
		let _ = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).with_test_writer().try_init();
	});
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
	Create(char, u64),
	Update(char, u64),
	Insert(char, Option<char>),
	Move(char, Option<char>),
	Destroy(char, u64),
}

/// Gives each created block a serial number and mirrors the displayed order, like a DOM would.
#[derive(Debug, Default)]
pub struct Tracked {
	next_serial: u64,
	pub displayed: Vec<char>,
	pub events: Vec<Event>,
}
impl Tracked {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn count(&self, predicate: impl Fn(&Event) -> bool) -> usize {
		self.events.iter().filter(|event| predicate(event)).count()
	}

	fn splice(&mut self, key: char, before: Option<char>) {
		self.displayed.retain(|&k| k != key);
		let index = match before {
			Some(before) => self.displayed.iter().position(|&k| k == before).expect("anchor not displayed"),
			None => self.displayed.len(),
		};
		self.displayed.insert(index, key);
	}
}

impl Host<char> for Tracked {
	type State = u64;

	fn insert_before(&mut self, block: &Block<char, u64>, anchor: Option<&Block<char, u64>>) {
		assert!(!self.displayed.contains(block.key()), "fresh block {:?} was already displayed", block.key());
		self.splice(*block.key(), anchor.map(|anchor| *anchor.key()));
		self.events.push(Event::Insert(*block.key(), anchor.map(|anchor| *anchor.key())));
	}

	fn move_before(&mut self, block: &Block<char, u64>, anchor: Option<&Block<char, u64>>) {
		assert!(self.displayed.contains(block.key()), "moved block {:?} wasn't displayed", block.key());
		self.splice(*block.key(), anchor.map(|anchor| *anchor.key()));
		self.events.push(Event::Move(*block.key(), anchor.map(|anchor| *anchor.key())));
	}

	fn destroy(&mut self, block: Block<char, u64>) {
		let (key, serial) = block.into_parts();
		self.displayed.retain(|&k| k != key);
		self.events.push(Event::Destroy(key, serial));
	}
}

impl Renderer<char, char> for Tracked {
	fn create(&mut self, &key: &char, _: &char) -> u64 {
		let serial = self.next_serial;
		self.next_serial += 1;
		self.events.push(Event::Create(key, serial));
		serial
	}

	fn update(&mut self, block: &mut Block<char, u64>, _: &char) {
		self.events.push(Event::Update(*block.key(), *block.state()));
	}
}

pub fn keys(blocks: &[Block<char, u64>]) -> Vec<char> {
	blocks.iter().map(|block| *block.key()).collect()
}
