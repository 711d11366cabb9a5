use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use unsegen::input::Input;

use crate::config::Config;

pub enum Event {
    Input(Input),
    /// Periodic tick, drives hover delays and redraws.
    Update,
}

/// Collects terminal input and ticks into one channel.
///
/// Both threads only produce events; all state lives with whoever calls
/// `next`.
pub struct Dispatcher {
    rx: mpsc::Receiver<Event>,
    _input_handle: thread::JoinHandle<()>,
    _update_handle: thread::JoinHandle<()>,
}

impl Dispatcher {
    pub fn from_config(config: &Config) -> Dispatcher {
        Dispatcher::with_tick_rate(config.tick_rate())
    }

    pub fn with_tick_rate(tick_rate: Duration) -> Dispatcher {
        let (tx, rx) = mpsc::channel();
        let input_handle = {
            let tx = tx.clone();
            thread::spawn(move || {
                let stdin = io::stdin();
                let stdin = stdin.lock();
                for evt in Input::read_all(stdin) {
                    match evt {
                        Ok(input) => {
                            if tx.send(Event::Input(input)).is_err() {
                                return;
                            }
                        }
                        Err(e) => log::warn!("failed to read input: {}", e),
                    }
                }
            })
        };
        let update_handle = {
            thread::spawn(move || loop {
                if tx.send(Event::Update).is_err() {
                    return;
                }
                thread::sleep(tick_rate);
            })
        };
        Dispatcher {
            rx,
            _input_handle: input_handle,
            _update_handle: update_handle,
        }
    }

    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }
}
