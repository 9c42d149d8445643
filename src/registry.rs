use std::collections::HashSet;
use std::sync::Arc;

use anyhow::anyhow;
use search_highlight_hooks::{Action, Filter};
use tracing::debug;

use crate::config::{HighlightConfig, HighlightTag};

/// Default excerpt length in words.
pub const EXCERPT_LENGTH: usize = 55;

type Chain<T> = Vec<Box<dyn Filter<T>>>;

struct Hooks {
    tag: Chain<String>,
    excerpt_length: Chain<usize>,
    excerpt_more: Chain<String>,
    content: Chain<String>,
    prepare_excerpt: Vec<Box<dyn Action>>,
}

/// The extension points the resolver and the excerpt rewriter consult.
/// Each chain runs its filters in registration order.
#[derive(Clone)]
pub struct Registry {
    hooks: Arc<Hooks>,
}

pub struct RegistryBuilder {
    hooks: Hooks,
}

impl RegistryBuilder {
    pub fn tag(mut self, filter: impl 'static + Filter<String>) -> Self {
        self.hooks.tag.push(Box::new(filter));
        self
    }

    pub fn excerpt_length(mut self, filter: impl 'static + Filter<usize>) -> Self {
        self.hooks.excerpt_length.push(Box::new(filter));
        self
    }

    pub fn excerpt_more(mut self, filter: impl 'static + Filter<String>) -> Self {
        self.hooks.excerpt_more.push(Box::new(filter));
        self
    }

    pub fn content(mut self, filter: impl 'static + Filter<String>) -> Self {
        self.hooks.content.push(Box::new(filter));
        self
    }

    pub fn prepare_excerpt(mut self, action: impl 'static + Action) -> Self {
        self.hooks.prepare_excerpt.push(Box::new(action));
        self
    }

    pub fn build(self) -> anyhow::Result<Registry> {
        let hooks = self.hooks;
        unique("tag", hooks.tag.iter().map(|f| f.name()))?;
        unique("excerpt_length", hooks.excerpt_length.iter().map(|f| f.name()))?;
        unique("excerpt_more", hooks.excerpt_more.iter().map(|f| f.name()))?;
        unique("content", hooks.content.iter().map(|f| f.name()))?;
        unique("prepare_excerpt", hooks.prepare_excerpt.iter().map(|a| a.name()))?;
        Ok(Registry {
            hooks: Arc::new(hooks),
        })
    }
}

fn unique(hook: &str, names: impl Iterator<Item = &'static str>) -> anyhow::Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(anyhow!("filter {} already registered on {}", name, hook));
        }
    }
    Ok(())
}

fn run<T>(hook: &str, chain: &[Box<dyn Filter<T>>], value: T) -> T {
    chain.iter().fold(value, |value, filter| {
        debug!("apply filter {} on {}", filter.name(), hook);
        filter.apply(value)
    })
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder {
            hooks: Hooks {
                tag: Vec::new(),
                excerpt_length: Vec::new(),
                excerpt_more: Vec::new(),
                content: Vec::new(),
                prepare_excerpt: Vec::new(),
            },
        }
    }

    /// The effective highlight tag, before allow-list validation.
    pub fn tag(&self, default_tag: String) -> String {
        run("tag", &self.hooks.tag, default_tag)
    }

    /// The tag to highlight with: the configured tag through the tag
    /// filters, validated against the allow-list.
    pub fn highlight_tag(&self, config: &HighlightConfig) -> HighlightTag {
        HighlightTag::resolve(&self.tag(config.tag.clone()))
    }

    pub fn excerpt_length(&self, default_length: usize) -> usize {
        run("excerpt_length", &self.hooks.excerpt_length, default_length)
    }

    pub fn excerpt_more(&self, candidate: String) -> String {
        run("excerpt_more", &self.hooks.excerpt_more, candidate)
    }

    /// Renders raw content through the content filters.
    pub fn content(&self, raw: String) -> String {
        run("content", &self.hooks.content, raw)
    }

    pub fn prepare_excerpt(&self) {
        for action in self.hooks.prepare_excerpt.iter() {
            debug!("fire {} on prepare_excerpt", action.name());
            action.fire();
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry {
            hooks: Arc::new(Self::builder().hooks),
        }
    }
}
