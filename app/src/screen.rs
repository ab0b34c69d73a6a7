use crate::error::ErrorKind;
use crate::router::Route;
use anyhow::Error;
use prettytable::Table;
use std::fmt::{self, Display};

/// What a rendered element is for, used to look elements up
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Role {
    Heading,
    Link,
    Textbox,
    Password,
    Combobox,
    Button,
    Image,
    Text,
    Table,
    Alert,
}

impl Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Heading => "heading",
            Role::Link => "link",
            Role::Textbox => "textbox",
            Role::Password => "password field",
            Role::Combobox => "combobox",
            Role::Button => "button",
            Role::Image => "image",
            Role::Text => "text",
            Role::Table => "table",
            Role::Alert => "alert",
        };

        write!(f, "{}", name)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Action {
    Submit,
    Logout,
}

#[derive(Debug, Clone)]
pub enum Element {
    Heading(String),
    Link {
        label: String,
        route: Route,
    },
    Text(String),
    Image {
        src: String,
        alt: String,
    },
    Input {
        label: String,
        secret: bool,
        value: String,
    },
    Select {
        label: String,
        options: Vec<String>,
        selected: Option<String>,
    },
    Button {
        label: String,
        action: Action,
    },
    Table(Table),
    Alert(String),
}

impl Element {
    pub fn role(&self) -> Role {
        match self {
            Element::Heading(_) => Role::Heading,
            Element::Link { .. } => Role::Link,
            Element::Text(_) => Role::Text,
            Element::Image { .. } => Role::Image,
            Element::Input { secret: true, .. } => Role::Password,
            Element::Input { .. } => Role::Textbox,
            Element::Select { .. } => Role::Combobox,
            Element::Button { .. } => Role::Button,
            Element::Table(_) => Role::Table,
            Element::Alert(_) => Role::Alert,
        }
    }

    /// The accessible name of the element
    pub fn name(&self) -> &str {
        match self {
            Element::Heading(text) | Element::Text(text) | Element::Alert(text) => text.as_str(),
            Element::Link { label, .. }
            | Element::Input { label, .. }
            | Element::Select { label, .. }
            | Element::Button { label, .. } => label.as_str(),
            Element::Image { alt, .. } => alt.as_str(),
            Element::Table(_) => "",
        }
    }

    pub fn route(&self) -> Option<&Route> {
        match self {
            Element::Link { route, .. } => Some(route),
            _ => None,
        }
    }

    pub fn action(&self) -> Option<Action> {
        match self {
            Element::Button { action, .. } => Some(*action),
            _ => None,
        }
    }

    fn matches(&self, pattern: &str) -> bool {
        self.name().to_lowercase().contains(&pattern.to_lowercase())
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Heading(text) => write!(f, "== {} ==", text),
            Element::Link { label, route } => write!(f, "-> {} ({})", label, route),
            Element::Text(text) => write!(f, "{}", text),
            Element::Image { src, alt } => write!(f, "[image: {}] {}", alt, src),
            Element::Input {
                label,
                secret,
                value,
            } => {
                let shown = if *secret {
                    "*".repeat(value.chars().count())
                } else {
                    value.clone()
                };
                write!(f, "{} [{}]", label, shown)
            }
            Element::Select {
                label,
                options,
                selected,
            } => write!(
                f,
                "{} <{}> [{}]",
                label,
                options.join("|"),
                selected.as_deref().unwrap_or("")
            ),
            Element::Button { label, .. } => write!(f, "( {} )", label),
            Element::Table(table) => write!(f, "{}", table.to_string().trim_end()),
            Element::Alert(text) => write!(f, "! {}", text),
        }
    }
}

/// Everything the current view rendered, in order
#[derive(Debug, Clone, Default)]
pub struct Screen {
    elements: Vec<Element>,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn all(&self, role: Role) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(move |e| e.role() == role)
    }

    /// Find the single element of any of `roles` whose name contains `name`,
    /// ignoring case. An exact name wins over partial matches.
    pub fn get_any(&self, roles: &[Role], name: &str) -> Result<&Element, Error> {
        let matched: Vec<&Element> = self
            .elements
            .iter()
            .filter(|e| roles.contains(&e.role()) && e.matches(name))
            .collect();

        let role = roles.first().copied().unwrap_or(Role::Text);
        match matched.len() {
            0 => Err(ErrorKind::ElementNotFound(role, name.into()).into()),
            1 => Ok(matched[0]),
            n => {
                let exact: Vec<&Element> = matched
                    .iter()
                    .copied()
                    .filter(|e| e.name().eq_ignore_ascii_case(name))
                    .collect();

                if exact.len() == 1 {
                    Ok(exact[0])
                } else {
                    Err(ErrorKind::AmbiguousElement(role, name.into(), n).into())
                }
            }
        }
    }

    pub fn get(&self, role: Role, name: &str) -> Result<&Element, Error> {
        self.get_any(&[role], name)
    }

    pub fn query(&self, role: Role, name: &str) -> Option<&Element> {
        self.get(role, name).ok()
    }

    /// The single element of `role` named exactly `name`, ignoring case
    pub fn exact(&self, role: Role, name: &str) -> Option<&Element> {
        let mut named = self
            .all(role)
            .filter(|e| e.name().eq_ignore_ascii_case(name));

        match (named.next(), named.next()) {
            (Some(element), None) => Some(element),
            _ => None,
        }
    }

    pub fn heading(&self) -> Option<&str> {
        self.all(Role::Heading).next().map(|e| e.name())
    }

    /// All rendered text, one element per line
    pub fn text(&self) -> String {
        self.to_string()
    }
}

impl Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for element in &self.elements {
            writeln!(f, "{}", element)?;
        }

        Ok(())
    }
}
