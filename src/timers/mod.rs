//! Nested wall clock timers used for solver reporting.

use std::collections::HashMap;
use std::io::Write;
use std::ops::{Deref, DerefMut};
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct InnerTimer {
    start: Option<Instant>,
    elapsed: Duration,
    subtimers: SubTimersMap,
}

impl InnerTimer {
    fn reset(&mut self) {
        self.start = None;
        self.elapsed = Duration::ZERO;
        self.subtimers.clear();
    }

    fn start(&mut self) {
        self.start = Some(Instant::now());
    }

    fn stop(&mut self) {
        if let Some(instant) = self.start.take() {
            self.elapsed += instant.elapsed();
        }
    }

    // bank the running time of an active timer and its children
    fn suspend(&mut self) {
        if let Some(instant) = self.start {
            self.elapsed += instant.elapsed();
            self.subtimers.suspend();
        }
    }

    fn resume(&mut self) {
        if self.start.is_some() {
            self.start = Some(Instant::now());
            self.subtimers.resume();
        }
    }
}

#[derive(Debug, Default)]
struct SubTimersMap(HashMap<&'static str, InnerTimer>);

impl Deref for SubTimersMap {
    type Target = HashMap<&'static str, InnerTimer>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl DerefMut for SubTimersMap {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl SubTimersMap {
    fn suspend(&mut self) {
        self.values_mut().for_each(InnerTimer::suspend);
    }

    fn resume(&mut self) {
        self.values_mut().for_each(InnerTimer::resume);
    }

    fn total_time(&self) -> Duration {
        self.values().map(|t| t.elapsed).sum()
    }

    fn find(&self, path: &[&str]) -> Option<&InnerTimer> {
        let (first, rest) = path.split_first()?;
        let timer = self.get(*first)?;
        if rest.is_empty() {
            Some(timer)
        } else {
            timer.subtimers.find(rest)
        }
    }

    fn print(&self, out: &mut dyn Write, depth: usize) -> std::io::Result<()> {
        let mut keys: Vec<_> = self.keys().collect();
        keys.sort();
        for key in keys {
            let timer = &self[key];
            writeln!(out, "{:indent$}{} : {:?}", "", key, timer.elapsed, indent = 4 * depth)?;
            timer.subtimers.print(out, depth + 1)?;
        }
        Ok(())
    }
}

/// A stack of named, nestable timers.
///
/// Timers are started with [`start_as_current`](Timers::start_as_current),
/// which nests the new timer inside whichever timer is currently running.
/// Most code uses the `timeit!` and `notimeit!` macros instead.
#[derive(Default, Debug)]
pub struct Timers {
    stack: Vec<&'static str>,
    subtimers: SubTimersMap,
}

impl Timers {
    fn mut_active_timer(&mut self) -> Option<&mut InnerTimer> {
        let (first, rest) = self.stack.split_first()?;
        let mut active = self.subtimers.get_mut(first)?;
        for key in rest {
            active = active.subtimers.get_mut(key)?;
        }
        Some(active)
    }

    /// Clears the timer `key` at the root level
    pub fn reset_timer(&mut self, key: &'static str) {
        self.subtimers.entry(key).or_default().reset();
    }

    /// Starts a timer named `key` as a child of the current timer
    pub fn start_as_current(&mut self, key: &'static str) {
        match self.mut_active_timer() {
            Some(active) => active.subtimers.entry(key).or_default().start(),
            None => self.subtimers.entry(key).or_default().start(),
        }
        self.stack.push(key);
    }

    /// Stops the most recently started timer
    pub fn stop_current(&mut self) {
        if let Some(active) = self.mut_active_timer() {
            active.stop();
        }
        self.stack.pop();
    }

    /// Suspends every running timer.  Used for `notimeit!`
    pub fn suspend(&mut self) {
        self.subtimers.suspend();
    }

    /// Resumes every suspended timer.  Used for `notimeit!`
    pub fn resume(&mut self) {
        self.subtimers.resume();
    }

    /// Sum of the root level timers
    pub fn total_time(&self) -> Duration {
        self.subtimers.total_time()
    }

    /// Elapsed time of the timer at `path`, e.g. `&["solve", "iterate"]`
    pub fn elapsed(&self, path: &[&str]) -> Option<Duration> {
        self.subtimers.find(path).map(|t| t.elapsed)
    }

    /// Writes an indented report of all timers
    pub fn print(&self, out: &mut dyn Write) -> std::io::Result<()> {
        self.subtimers.print(out, 0)
    }
}

macro_rules! timeit {
    ($timer:ident => $key:literal; $($tt:tt)+) => {

        $timer.start_as_current($key);
        $(
            $tt
        )+
        $timer.stop_current();
    }
}
pub(crate) use timeit;

macro_rules! notimeit {
    ($timer:ident; $($tt:tt)+) => {

        $timer.suspend();
        $(
            $tt
        )+
        $timer.resume();
    }
}
pub(crate) use notimeit;
