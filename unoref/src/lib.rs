//! Server-side referee for a networked UNO-style card game.
//!
//! The referee owns every hidden piece of the game (hands, deck, discard
//! pile) and talks to untrusted clients only through a [`bus::MessageBus`].
//! Three loops share one [`table::Table`] through a [`lock::GameLock`]: the
//! [`referee::Referee`] turn engine and the two [`watcher`]s for UNO calls
//! and missing-UNO accusations.

pub mod board;
pub mod bus;
pub mod card;
pub mod config;
pub mod constants;
pub mod deck;
pub mod error;
pub mod inspect;
pub mod lock;
pub mod message;
pub mod player;
pub mod referee;
pub mod stack;
pub mod state;
pub mod table;
pub mod turn;
pub mod watcher;
