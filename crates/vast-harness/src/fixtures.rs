//! A small two-type feed used across the integration tests.

use vast_adapter::{
    AdapterConfig, FnDiff, HolderRegistry, ListAdapter, ListUpdateSink, TypeKey,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picture {
    pub id: u32,
    pub url: String,
}

/// One feed entry. People and pictures have separate id spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feed {
    Person(Person),
    Picture(Picture),
}

impl Feed {
    #[must_use]
    pub fn person(id: u32, name: &str) -> Self {
        Self::Person(Person {
            id,
            name: name.to_owned(),
        })
    }

    #[must_use]
    pub fn picture(id: u32, url: &str) -> Self {
        Self::Picture(Picture {
            id,
            url: url.to_owned(),
        })
    }

    #[must_use]
    pub fn id(&self) -> u32 {
        match self {
            Self::Person(p) => p.id,
            Self::Picture(p) => p.id,
        }
    }
}

pub const PERSON: &str = "person";
pub const PICTURE: &str = "picture";
pub const EMPTY: &str = "empty";

/// View type of a feed entry.
#[must_use]
pub fn feed_key(item: &Feed) -> TypeKey {
    match item {
        Feed::Person(_) => TypeKey::name(PERSON),
        Feed::Picture(_) => TypeKey::name(PICTURE),
    }
}

/// Registry with `String` holders: `"person:<name>@<pos>"`,
/// `"picture:<url>@<pos>"`, and a static empty view.
#[must_use]
pub fn feed_registry() -> HolderRegistry<Feed, String> {
    HolderRegistry::builder()
        .register(
            PERSON,
            |_| String::from("person:"),
            |holder: &mut String, item: &Feed, pos| {
                if let Feed::Person(p) = item {
                    *holder = format!("person:{}@{pos}", p.name);
                }
            },
        )
        .register(
            PICTURE,
            |_| String::from("picture:"),
            |holder: &mut String, item: &Feed, pos| {
                if let Feed::Picture(p) = item {
                    *holder = format!("picture:{}@{pos}", p.url);
                }
            },
        )
        .register_static(EMPTY, |_| String::from("(empty)"))
        .build()
}

/// A feed adapter reporting to `sink`. The type key already separates
/// people from pictures, so identity only compares ids.
pub fn feed_adapter(
    config: AdapterConfig,
    sink: impl ListUpdateSink + 'static,
) -> ListAdapter<Feed, String> {
    ListAdapter::builder(
        feed_registry(),
        FnDiff::new(|a: &Feed, b: &Feed| a.id() == b.id(), |a: &Feed, b: &Feed| a == b),
    )
    .type_key_of(feed_key)
    .config(config)
    .sink(sink)
    .build()
}

/// Inflate and bind every row, the way a host showing the whole list
/// would.
pub fn render<T>(adapter: &ListAdapter<T, String>) -> Vec<String> {
    (0..adapter.item_count())
        .map(|pos| {
            let mut holder = adapter.create_view_holder(&adapter.item_type_key(pos));
            adapter.bind_view_holder(pos, &mut holder);
            holder
        })
        .collect()
}
