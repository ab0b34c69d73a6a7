// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::error::ErrorKind;
use crate::screen::{Action, Element, Screen};
use std::collections::HashMap;
use std::fmt::{self, Display};
use std::str::FromStr;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Type {
    Text,
    Secret,
    Score,
}

impl Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Type::Text => "text",
            Type::Secret => "hidden",
            Type::Score => "score",
        };

        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Field<'a> {
    Required(&'a str, Type),
    Optional(&'a str, Type),
}

impl<'a> Field<'a> {
    pub fn is_optional(&self) -> bool {
        matches!(self, Field::Optional(..))
    }

    pub fn label(&self) -> &'a str {
        match self {
            Field::Required(label, _) | Field::Optional(label, _) => *label,
        }
    }

    pub fn ty(&self) -> Type {
        match self {
            Field::Required(_, ty) | Field::Optional(_, ty) => *ty,
        }
    }

    pub fn into_tuple(self) -> (&'a str, Type) {
        (self.label(), self.ty())
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Value {
    Text(String),
    Score(u8),
}

impl Value {
    pub fn from_str(value: &str, tp: Type) -> Result<Self, ErrorKind> {
        let value = match tp {
            Type::Text | Type::Secret => Self::Text(value.to_owned()),
            Type::Score => {
                let value: u8 = value
                    .trim()
                    .parse()
                    .map_err(|e: <u8 as FromStr>::Err| ErrorKind::ValueConvert(e.to_string()))?;
                Self::Score(value)
            }
        };

        Ok(value)
    }

    pub fn as_text(&self) -> Result<&str, ErrorKind> {
        match self {
            Self::Text(s) => Ok(s),
            _ => Err(ErrorKind::CastingValue("text")),
        }
    }

    pub fn as_score(&self) -> Result<u8, ErrorKind> {
        match self {
            Self::Score(v) => Ok(*v),
            _ => Err(ErrorKind::CastingValue("score")),
        }
    }

    fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::Score(_) => false,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{}", s),
            Self::Score(v) => write!(f, "{}", v),
        }
    }
}

/// Field values of a view plus its submit button and last error
#[derive(Debug, Clone)]
pub struct Form {
    fields: Vec<Field<'static>>,
    values: HashMap<&'static str, Value>,
    choices: Vec<u8>,
    submit: &'static str,
    error: Option<String>,
}

impl Form {
    pub fn new(fields: Vec<Field<'static>>, submit: &'static str) -> Self {
        Self {
            fields,
            values: HashMap::new(),
            choices: Vec::new(),
            submit,
            error: None,
        }
    }

    /// Options offered by score fields
    pub fn with_choices(mut self, choices: impl IntoIterator<Item = u8>) -> Self {
        self.choices = choices.into_iter().collect();
        self
    }

    pub fn fields(&self) -> &[Field<'static>] {
        &self.fields
    }

    pub fn get(&self, label: &str) -> Option<&Value> {
        self.values.get(label)
    }

    pub fn set(&mut self, label: &str, value: Value) -> Result<(), ErrorKind> {
        let field = self
            .fields
            .iter()
            .find(|field| field.label() == label)
            .ok_or_else(|| ErrorKind::FieldType(label.into()))?;

        match (field.ty(), &value) {
            (Type::Score, Value::Score(score)) => {
                if !self.choices.contains(score) {
                    return Err(ErrorKind::InvalidOption(label.into(), score.to_string()));
                }
            }
            (Type::Text, Value::Text(_)) | (Type::Secret, Value::Text(_)) => {}
            _ => return Err(ErrorKind::FieldType(label.into())),
        }

        self.values.insert(field.label(), value);
        Ok(())
    }

    pub fn clear(&mut self, label: &str) {
        self.values.remove(label);
    }

    /// The first required field left empty
    pub fn missing(&self) -> Option<&'static str> {
        self.fields
            .iter()
            .filter(|field| !field.is_optional())
            .map(|field| field.label())
            .find(|label| self.values.get(label).map_or(true, Value::is_blank))
    }

    pub fn set_error(&mut self, error: impl ToString) {
        self.error = Some(error.to_string());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn render(&self, screen: &mut Screen) {
        for field in &self.fields {
            let label = field.label();
            let value = self.values.get(label);

            let element = match field.ty() {
                Type::Text | Type::Secret => Element::Input {
                    label: label.into(),
                    secret: field.ty() == Type::Secret,
                    value: value.map(|v| v.to_string()).unwrap_or_default(),
                },
                Type::Score => Element::Select {
                    label: label.into(),
                    options: self.choices.iter().map(|c| c.to_string()).collect(),
                    selected: value.map(|v| v.to_string()),
                },
            };

            screen.push(element);
        }

        if let Some(error) = &self.error {
            screen.push(Element::Alert(error.clone()));
        }

        screen.push(Element::Button {
            label: self.submit.into(),
            action: Action::Submit,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::Role;
    use anyhow::Error;

    fn score_form() -> Form {
        Form::new(vec![Field::Required("Score:", Type::Score)], "Submit").with_choices(1..=5)
    }

    #[test]
    fn casting_text() -> Result<(), Error> {
        let value = Value::from_str("user1@test.com", Type::Text)?;
        assert_eq!(value.as_text()?, "user1@test.com");
        assert!(value.as_score().is_err());

        Ok(())
    }

    #[test]
    fn casting_score() -> Result<(), Error> {
        let value = Value::from_str(" 4 ", Type::Score)?;
        assert_eq!(value.as_score()?, 4);

        assert!(Value::from_str("four", Type::Score).is_err());
        assert!(Value::from_str("-1", Type::Score).is_err());

        Ok(())
    }

    #[test]
    fn score_must_be_an_offered_choice() -> Result<(), Error> {
        let mut form = score_form();
        form.set("Score:", Value::Score(3))?;
        assert_eq!(form.get("Score:"), Some(&Value::Score(3)));

        assert_eq!(
            form.set("Score:", Value::Score(9)),
            Err(ErrorKind::InvalidOption("Score:".into(), "9".into()))
        );
        assert_eq!(
            form.set("Score:", Value::Text("3".into())),
            Err(ErrorKind::FieldType("Score:".into()))
        );

        Ok(())
    }

    #[test]
    fn missing_required_fields() -> Result<(), Error> {
        let mut form = Form::new(
            vec![
                Field::Required("Email:", Type::Text),
                Field::Required("Password:", Type::Secret),
                Field::Optional("Nickname:", Type::Text),
            ],
            "Log In",
        );
        assert_eq!(form.missing(), Some("Email:"));

        form.set("Email:", Value::Text("   ".into()))?;
        assert_eq!(form.missing(), Some("Email:"));

        form.set("Email:", Value::Text("user1@test.com".into()))?;
        assert_eq!(form.missing(), Some("Password:"));

        form.set("Password:", Value::Text("test".into()))?;
        assert_eq!(form.missing(), None);

        Ok(())
    }

    #[test]
    fn renders_fields_error_and_button() -> Result<(), Error> {
        let mut form = score_form();
        form.set("Score:", Value::Score(2))?;
        form.set_error("Server responded with status 500");

        let mut screen = Screen::new();
        form.render(&mut screen);

        let roles: Vec<Role> = screen.elements().iter().map(|e| e.role()).collect();
        assert_eq!(roles, vec![Role::Combobox, Role::Alert, Role::Button]);
        assert!(screen.text().contains("Score: <1|2|3|4|5> [2]"));

        Ok(())
    }
}
