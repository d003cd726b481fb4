use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::Notify;

use crate::error::{Result, UnoError};
use crate::message::{Body, Command, Flow, Message};
use crate::player::{PlayerId, Roster};

/// Shape a message must have to be picked up. Unset fields match anything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pattern {
    player: Option<PlayerId>,
    command: Option<Command>,
    flow: Option<Flow>,
}

impl Pattern {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn command(command: Command) -> Self {
        Self {
            command: Some(command),
            ..Default::default()
        }
    }

    /// Every server notice for one player.
    pub fn addressed_to(player: impl Into<PlayerId>) -> Self {
        Self::any().player(player).flow(Flow::ToClient)
    }

    pub fn player(mut self, player: impl Into<PlayerId>) -> Self {
        self.player = Some(player.into());
        self
    }

    pub fn flow(mut self, flow: Flow) -> Self {
        self.flow = Some(flow);
        self
    }

    pub fn matches(&self, message: &Message) -> bool {
        let command = message.command();
        self.player.as_ref().map_or(true, |player| *player == message.player)
            && self.command.map_or(true, |x| x == command)
            && self.flow.map_or(true, |x| x == command.flow())
    }
}

#[derive(Debug, Default)]
struct Space {
    messages: VecDeque<Message>,
    closed: bool,
}

#[derive(Debug, Default)]
struct Inner {
    space: Mutex<Space>,
    notify: Notify,
}

/// Associative message channel shared by the referee, the watchers and the
/// clients. Messages stay put until some caller takes one matching its
/// pattern, so several consumers can block on different shapes at once.
#[derive(Clone, Debug, Default)]
pub struct MessageBus {
    inner: Arc<Inner>,
}

impl MessageBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, message: Message) -> Result<()> {
        {
            let mut space = self.space();
            if space.closed {
                return Err(UnoError::BusClosed);
            }
            space.messages.push_back(message);
        }
        self.inner.notify.notify_waiters();
        Ok(())
    }

    /// Sends a copy of `body` to every seat.
    pub fn broadcast(&self, roster: &Roster, body: Body) -> Result<()> {
        for player in roster.iter() {
            self.put(Message::new(player.clone(), body.clone()))?;
        }
        Ok(())
    }

    /// Waits for the oldest matching message and removes it.
    pub async fn get(&self, pattern: &Pattern) -> Result<Message> {
        loop {
            // Registered before looking so a concurrent put cannot slip past.
            let notified = self.inner.notify.notified();
            if let Some(message) = self.find(pattern, true)? {
                return Ok(message);
            }
            notified.await;
        }
    }

    /// Waits for the oldest matching message and returns a copy of it.
    pub async fn query(&self, pattern: &Pattern) -> Result<Message> {
        loop {
            let notified = self.inner.notify.notified();
            if let Some(message) = self.find(pattern, false)? {
                return Ok(message);
            }
            notified.await;
        }
    }

    pub fn getp(&self, pattern: &Pattern) -> Option<Message> {
        self.find(pattern, true).ok().flatten()
    }

    pub fn queryp(&self, pattern: &Pattern) -> Option<Message> {
        self.find(pattern, false).ok().flatten()
    }

    /// Fails every blocked and future call with [`UnoError::BusClosed`].
    pub fn close(&self) {
        self.space().closed = true;
        self.inner.notify.notify_waiters();
    }

    pub fn len(&self) -> usize {
        self.space().messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.space().messages.is_empty()
    }

    fn find(&self, pattern: &Pattern, remove: bool) -> Result<Option<Message>> {
        let mut space = self.space();
        if space.closed {
            return Err(UnoError::BusClosed);
        }

        let Some(index) = space.messages.iter().position(|x| pattern.matches(x)) else {
            return Ok(None);
        };
        if remove {
            Ok(space.messages.remove(index))
        } else {
            Ok(space.messages.get(index).cloned())
        }
    }

    fn space(&self) -> MutexGuard<'_, Space> {
        self.inner
            .space
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn get_waits_for_a_matching_message() {
        let bus = MessageBus::new();

        let waiter = {
            let bus = bus.clone();
            tokio::spawn(async move { bus.get(&Pattern::command(Command::Ended)).await })
        };
        tokio::task::yield_now().await;

        bus.put(Message::new("Mark", Body::Taken)).unwrap();
        bus.put(Message::new("Talha", Body::Ended)).unwrap();

        let message = tokio::time::timeout(Duration::from_secs(5), waiter)
            .await
            .unwrap()
            .unwrap()
            .unwrap();

        assert_eq!(message, Message::new("Talha", Body::Ended));
        assert_eq!(bus.len(), 1);
        assert!(bus.queryp(&Pattern::command(Command::Taken)).is_some());
    }

    #[tokio::test]
    async fn unset_fields_act_as_wildcards() {
        let bus = MessageBus::new();
        bus.put(Message::new("Mark", Body::Success)).unwrap();
        bus.put(Message::new("Mark", Body::Ready)).unwrap();
        bus.put(Message::new("Talha", Body::Invalid)).unwrap();

        let to_talha = bus.get(&Pattern::addressed_to("Talha")).await.unwrap();
        assert_eq!(to_talha.body, Body::Invalid);

        let to_mark = bus.get(&Pattern::addressed_to("Mark")).await.unwrap();
        assert_eq!(to_mark.body, Body::Success);

        let any = bus.get(&Pattern::any()).await.unwrap();
        assert_eq!(any.body, Body::Ready);
        assert!(bus.is_empty());
    }

    #[tokio::test]
    async fn query_waits_and_leaves_the_message_in_place() {
        let bus = MessageBus::new();

        let watcher = {
            let bus = bus.clone();
            tokio::spawn(async move { bus.query(&Pattern::command(Command::Ready)).await })
        };
        tokio::task::yield_now().await;
        assert!(!watcher.is_finished());

        bus.put(Message::new("Mark", Body::Ready)).unwrap();

        let message = tokio::time::timeout(Duration::from_secs(5), watcher)
            .await
            .unwrap()
            .unwrap()
            .unwrap();

        assert_eq!(message, Message::new("Mark", Body::Ready));
        assert_eq!(bus.len(), 1);
        assert_eq!(bus.getp(&Pattern::any()), Some(message));
    }

    #[test]
    fn queryp_leaves_the_message_in_place() {
        let bus = MessageBus::new();
        bus.put(Message::new("Mark", Body::Ready)).unwrap();

        let pattern = Pattern::command(Command::Ready).player("Mark");
        assert!(bus.queryp(&pattern).is_some());
        assert!(bus.getp(&pattern).is_some());
        assert!(bus.getp(&pattern).is_none());
    }

    #[test]
    fn broadcast_reaches_every_seat() {
        let bus = MessageBus::new();
        let roster = Roster::new(vec!["Mark".into(), "Talha".into(), "Volkan".into()]).unwrap();

        bus.broadcast(&roster, Body::AllReady).unwrap();

        for player in roster.iter() {
            let pattern = Pattern::command(Command::AllReady).player(player.clone());
            assert!(bus.getp(&pattern).is_some());
        }
        assert!(bus.is_empty());
    }

    #[tokio::test]
    async fn close_fails_blocked_receivers() {
        let bus = MessageBus::new();

        let waiter = {
            let bus = bus.clone();
            tokio::spawn(async move { bus.get(&Pattern::any()).await })
        };
        tokio::task::yield_now().await;
        bus.close();

        let result = tokio::time::timeout(Duration::from_secs(5), waiter)
            .await
            .unwrap()
            .unwrap();

        assert!(matches!(result, Err(UnoError::BusClosed)));
        assert!(matches!(
            bus.put(Message::new("Mark", Body::Ready)),
            Err(UnoError::BusClosed)
        ));
    }
}
