//! The robot: identity, listener tables, dispatch and outgoing messages.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use hermes_core::{Context, Event, HermesError, Outgoing, OutgoingKind, Result};
use regex::Regex;
use serde_json::{json, Value};
use tracing::{debug, error, info, instrument};

use crate::brain::{Attrs, Brain};
use crate::help::HelpEntry;
use crate::listener::{
    ChatHandler, ChatSubscription, EventHandler, GenericSubscription, ListenerId,
};
use crate::plugin::Plugin;
use crate::response::Response;
use crate::route::{ChatEvent, Route};

/// Mention template used when none is configured; `%s` is replaced by the nickname.
pub const DEFAULT_TEMPLATE: &str = "@%s ";

/// Nickname derived from a display name: lowercase with whitespace removed.
pub fn nickify(name: &str) -> String {
    name.split_whitespace().collect::<String>().to_lowercase()
}

struct Identity {
    name: String,
    nickname: String,
    template: String,
    mention_regex: Regex,
}

impl Identity {
    fn new(name: &str, nickname: &str, template: &str) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(HermesError::InvalidArgument(
                "robot name must not be empty".to_string(),
            ));
        }
        if nickname.is_empty() || nickname.chars().any(char::is_whitespace) {
            return Err(HermesError::InvalidArgument(format!(
                "nickname must be a single non-empty word: {:?}",
                nickname
            )));
        }
        if !template.contains("%s") {
            return Err(HermesError::InvalidArgument(format!(
                "mention template must contain %s: {:?}",
                template
            )));
        }
        let mention = template.replace("%s", nickname);
        let mention_regex = Regex::new(&format!("(?is)^{}(.*)$", regex::escape(&mention)))?;
        Ok(Self {
            name: name.to_string(),
            nickname: nickname.to_string(),
            template: template.to_string(),
            mention_regex,
        })
    }

    fn mention(&self) -> String {
        self.template.replace("%s", &self.nickname)
    }
}

struct Inner {
    identity: RwLock<Identity>,
    chat: RwLock<Vec<Arc<ChatSubscription>>>,
    generic: RwLock<Vec<Arc<GenericSubscription>>>,
    next_id: AtomicU64,
    brain: Brain,
    help: RwLock<Vec<HelpEntry>>,
    plugins: RwLock<Vec<String>>,
}

/// Chat robot. Cloning yields another handle to the same robot.
///
/// Dispatch is synchronous: [`Robot::hear`] returns after every matching listener ran.
/// No lock is held while handlers run, so handlers may register listeners, deregister them
/// or call `hear` again.
#[derive(Clone)]
pub struct Robot {
    inner: Arc<Inner>,
}

impl Robot {
    /// Robot named `name`, nickname `nickify(name)` and the default mention template.
    pub fn new(name: &str) -> Result<Self> {
        Self::with_identity(name, None, DEFAULT_TEMPLATE)
    }

    pub fn with_identity(name: &str, nickname: Option<&str>, template: &str) -> Result<Self> {
        let nickname = nickname.map_or_else(|| nickify(name), str::to_string);
        let identity = Identity::new(name, &nickname, template)?;
        Ok(Self {
            inner: Arc::new(Inner {
                identity: RwLock::new(identity),
                chat: RwLock::new(Vec::new()),
                generic: RwLock::new(Vec::new()),
                next_id: AtomicU64::new(1),
                brain: Brain::new(),
                help: RwLock::new(Vec::new()),
                plugins: RwLock::new(Vec::new()),
            }),
        })
    }

    // --- identity ---

    pub fn name(&self) -> String {
        read(&self.inner.identity).name.clone()
    }

    /// Renames the robot; the nickname follows as `nickify(name)`.
    pub fn set_name(&self, name: &str) -> Result<()> {
        let template = self.template();
        *write(&self.inner.identity) = Identity::new(name, &nickify(name), &template)?;
        Ok(())
    }

    pub fn nickname(&self) -> String {
        read(&self.inner.identity).nickname.clone()
    }

    pub fn set_nickname(&self, nickname: &str) -> Result<()> {
        let (name, template) = {
            let id = read(&self.inner.identity);
            (id.name.clone(), id.template.clone())
        };
        *write(&self.inner.identity) = Identity::new(&name, nickname, &template)?;
        Ok(())
    }

    pub fn template(&self) -> String {
        read(&self.inner.identity).template.clone()
    }

    pub fn set_template(&self, template: &str) -> Result<()> {
        let (name, nickname) = {
            let id = read(&self.inner.identity);
            (id.name.clone(), id.nickname.clone())
        };
        *write(&self.inner.identity) = Identity::new(&name, &nickname, template)?;
        Ok(())
    }

    /// The mention prefix: template with `%s` replaced by the nickname (e.g. `"@hermes "`).
    pub fn mention(&self) -> String {
        read(&self.inner.identity).mention()
    }

    /// Remainder of `message` after the mention prefix, if it starts with one.
    pub fn strip_mention(&self, message: &str) -> Option<String> {
        let identity = read(&self.inner.identity);
        identity
            .mention_regex
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    // --- dispatch ---

    /// Hears `message` in `context`: emits `hear` with the raw text, then `mention` with the
    /// remainder if the text starts with the mention prefix. At most one `mention` per call.
    ///
    /// The first handler error aborts the dispatch; it is logged, emitted as `error` and returned.
    #[instrument(skip(self, context), fields(robot = %self.nickname()))]
    pub fn hear(&self, message: &str, context: &Context) -> Result<()> {
        debug!(context = %context, "step: hear");
        self.emit(
            ChatEvent::Hear.as_str(),
            &Event::Hear {
                message: message.to_string(),
                context: context.clone(),
            },
        );
        self.dispatch(ChatEvent::Hear, message, context)?;

        if let Some(remainder) = self.strip_mention(message) {
            debug!(remainder = %remainder, "step: mention");
            self.emit(
                ChatEvent::Mention.as_str(),
                &Event::Mention {
                    message: remainder.clone(),
                    context: context.clone(),
                },
            );
            self.dispatch(ChatEvent::Mention, &remainder, context)?;
        }
        Ok(())
    }

    fn dispatch(&self, event: ChatEvent, text: &str, context: &Context) -> Result<()> {
        let listeners: Vec<Arc<ChatSubscription>> = read(&self.inner.chat)
            .iter()
            .filter(|l| l.route.event() == event)
            .cloned()
            .collect();

        for listener in listeners {
            let Some(captures) = listener.route.captures(text, context) else {
                continue;
            };
            if !listener.claim() {
                continue;
            }
            if listener.once {
                self.off(listener.id);
            }
            debug!(
                listener = %listener.id,
                event = %event,
                pattern = %listener.route.as_regex().as_str(),
                "listener matched"
            );
            let res = Response::new(self.clone(), event, text, captures, context.clone());
            if let Err(e) = (listener.handler)(&res, self) {
                error!(listener = %listener.id, event = %event, error = %e, "handler failed");
                self.emit(
                    "error",
                    &Event::Custom(json!({
                        "listener": listener.id.0,
                        "event": event.as_str(),
                        "message": text,
                        "error": e.to_string(),
                    })),
                );
                return Err(e);
            }
        }
        Ok(())
    }

    // --- chat subscriptions ---

    /// Registers a chat listener; the handler runs on every message matching `route`.
    pub fn on<F>(&self, route: Route, handler: F) -> ListenerId
    where
        F: Fn(&Response, &Robot) -> Result<()> + Send + Sync + 'static,
    {
        self.add_chat(route, Box::new(handler), false)
    }

    /// Registers a chat listener that deregisters itself after its first match.
    pub fn once<F>(&self, route: Route, handler: F) -> ListenerId
    where
        F: Fn(&Response, &Robot) -> Result<()> + Send + Sync + 'static,
    {
        self.add_chat(route, Box::new(handler), true)
    }

    /// `on(mention pattern)`.
    pub fn respond<F>(&self, pattern: &str, handler: F) -> Result<ListenerId>
    where
        F: Fn(&Response, &Robot) -> Result<()> + Send + Sync + 'static,
    {
        Ok(self.on(Route::mention().pattern(pattern)?, handler))
    }

    /// `on(hear pattern)`.
    pub fn listen<F>(&self, pattern: &str, handler: F) -> Result<ListenerId>
    where
        F: Fn(&Response, &Robot) -> Result<()> + Send + Sync + 'static,
    {
        Ok(self.on(Route::hear().pattern(pattern)?, handler))
    }

    fn add_chat(&self, route: Route, handler: ChatHandler, once: bool) -> ListenerId {
        let id = self.next_id();
        debug!(
            listener = %id,
            event = %route.event(),
            pattern = %route.as_regex().as_str(),
            filter = %route.context_filter(),
            once,
            "listener registered"
        );
        write(&self.inner.chat).push(Arc::new(ChatSubscription::new(id, route, handler, once)));
        id
    }

    /// Number of chat listeners registered for `event`.
    pub fn listener_count(&self, event: ChatEvent) -> usize {
        read(&self.inner.chat)
            .iter()
            .filter(|l| l.route.event() == event)
            .count()
    }

    /// Routes of the chat listeners, in registration order.
    pub fn routes(&self) -> Vec<Route> {
        read(&self.inner.chat)
            .iter()
            .map(|l| l.route.clone())
            .collect()
    }

    // --- generic subscriptions ---

    /// Plain listener for the event `name`; no filtering.
    pub fn subscribe<F>(&self, name: &str, handler: F) -> ListenerId
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.add_generic(name, Box::new(handler), false)
    }

    pub fn subscribe_once<F>(&self, name: &str, handler: F) -> ListenerId
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.add_generic(name, Box::new(handler), true)
    }

    fn add_generic(&self, name: &str, handler: EventHandler, once: bool) -> ListenerId {
        let id = self.next_id();
        write(&self.inner.generic).push(Arc::new(GenericSubscription::new(
            id,
            name.to_string(),
            handler,
            once,
        )));
        id
    }

    /// Delivers `event` to the subscribers of `name`; returns how many were called.
    pub fn emit(&self, name: &str, event: &Event) -> usize {
        let listeners: Vec<Arc<GenericSubscription>> = read(&self.inner.generic)
            .iter()
            .filter(|l| l.name == name)
            .cloned()
            .collect();

        let mut called = 0;
        for listener in listeners {
            if !listener.claim() {
                continue;
            }
            if listener.once {
                self.off(listener.id);
            }
            (listener.handler)(event);
            called += 1;
        }
        called
    }

    /// Removes a chat or generic listener. Returns false if the id is unknown.
    pub fn off(&self, id: ListenerId) -> bool {
        let mut chat = write(&self.inner.chat);
        let before = chat.len();
        chat.retain(|l| l.id != id);
        if chat.len() != before {
            return true;
        }
        drop(chat);

        let mut generic = write(&self.inner.generic);
        let before = generic.len();
        generic.retain(|l| l.id != id);
        generic.len() != before
    }

    fn next_id(&self) -> ListenerId {
        ListenerId(self.inner.next_id.fetch_add(1, Ordering::Relaxed))
    }

    // --- outgoing ---

    /// Emits an outgoing message under the event named after its kind.
    pub fn send(&self, kind: OutgoingKind, text: impl Into<String>, context: &Context) {
        let outgoing = Outgoing::new(kind, text, context.clone());
        debug!(kind = %kind, text = %outgoing.text, "outgoing");
        self.emit(kind.as_str(), &Event::Outgoing(outgoing));
    }

    pub fn say(&self, text: impl Into<String>, context: &Context) {
        self.send(OutgoingKind::Say, text, context);
    }

    pub fn reply(&self, text: impl Into<String>, context: &Context) {
        self.send(OutgoingKind::Reply, text, context);
    }

    pub fn emote(&self, text: impl Into<String>, context: &Context) {
        self.send(OutgoingKind::Emote, text, context);
    }

    pub fn error(&self, text: impl Into<String>, context: &Context) {
        self.send(OutgoingKind::Error, text, context);
    }

    pub fn warn(&self, text: impl Into<String>, context: &Context) {
        self.send(OutgoingKind::Warn, text, context);
    }

    pub fn info(&self, text: impl Into<String>, context: &Context) {
        self.send(OutgoingKind::Info, text, context);
    }

    pub fn success(&self, text: impl Into<String>, context: &Context) {
        self.send(OutgoingKind::Success, text, context);
    }

    pub fn topic(&self, text: impl Into<String>, context: &Context) {
        self.send(OutgoingKind::Topic, text, context);
    }

    // --- brain ---

    pub fn brain(&self) -> &Brain {
        &self.inner.brain
    }

    pub fn data(&self, key: &str) -> Option<Value> {
        self.inner.brain.data(key)
    }

    pub fn set_data(&self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.inner.brain.set_data(key, value)
    }

    pub fn user(&self, id: &str, attrs: Option<Attrs>) -> Attrs {
        self.inner.brain.user(id, attrs)
    }

    pub fn room(&self, id: &str, attrs: Option<Attrs>) -> Attrs {
        self.inner.brain.room(id, attrs)
    }

    // --- help ---

    /// Documents a command for the help plugin.
    pub fn help<S: AsRef<str>>(&self, triggers: &[S], description: &str) {
        write(&self.inner.help).push(HelpEntry {
            triggers: triggers.iter().map(|t| t.as_ref().to_string()).collect(),
            description: description.to_string(),
        });
    }

    pub fn help_entries(&self) -> Vec<HelpEntry> {
        read(&self.inner.help).clone()
    }

    // --- plugins ---

    /// Installs `plugin` by calling its `register` once. Returns the robot for chaining.
    pub fn use_plugin(&self, plugin: impl Plugin) -> Result<&Self> {
        plugin.register(self)?;
        info!(plugin = %plugin.name(), robot = %self.nickname(), "plugin installed");
        write(&self.inner.plugins).push(plugin.name().to_string());
        Ok(self)
    }

    /// Names of installed plugins, in installation order (repeats included).
    pub fn plugins(&self) -> Vec<String> {
        read(&self.inner.plugins).clone()
    }
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nickify() {
        assert_eq!(nickify("Bob"), "bob");
        assert_eq!(nickify("  Hermes  Bot "), "hermesbot");
    }

    #[test]
    fn test_set_name_updates_mention() {
        let robot = Robot::new("Hermes").unwrap();
        assert_eq!(robot.mention(), "@hermes ");
        robot.set_name("Bob").unwrap();
        assert_eq!(robot.name(), "Bob");
        assert_eq!(robot.nickname(), "bob");
        assert_eq!(robot.mention(), "@bob ");
    }

    #[test]
    fn test_identity_validation() {
        assert!(Robot::new("   ").is_err());
        assert!(Robot::with_identity("Hermes", Some("two words"), "@%s ").is_err());
        assert!(Robot::with_identity("Hermes", None, "no placeholder").is_err());

        let robot = Robot::new("Hermes").unwrap();
        assert!(robot.set_template("hey").is_err());
        assert_eq!(robot.template(), DEFAULT_TEMPLATE);
    }

    #[test]
    fn test_custom_template() {
        let robot = Robot::with_identity("Hermes", Some("herm"), "%s: ").unwrap();
        assert_eq!(robot.mention(), "herm: ");
        assert_eq!(robot.strip_mention("herm: ping").as_deref(), Some("ping"));
        assert_eq!(robot.strip_mention("HERM: ping").as_deref(), Some("ping"));
        assert_eq!(robot.strip_mention("@herm ping"), None);
    }

    #[test]
    fn test_mention_prefix_is_escaped() {
        let robot = Robot::with_identity("Hermes", Some("h.s"), "(%s) ").unwrap();
        assert_eq!(robot.strip_mention("(h.s) hi").as_deref(), Some("hi"));
        assert_eq!(robot.strip_mention("(hxs) hi"), None);
    }
}
