// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use anyhow::Error;
use app::form::{Field, Type, Value};
use rustyline::Editor;

macro_rules! field {
    ($ed:ident, $name:expr, $opt:expr, $ty:expr) => {{
        use rustyline::error::ReadlineError;

        let msg = field!(@msg $name, $opt, $ty);

        match $ed.readline(&msg) {
            Ok(line) => Ok(Some(line)),

            // CTRL-D
            Err(ReadlineError::Eof) => Ok(None),

            // Any error
            Err(e) => Err(Error::from(e)),
        }
    }};

    (@secret $name:expr, $opt:expr) => {{
        let msg = field!(@msg $name, $opt, Type::Secret);
        rpassword::prompt_password(msg)
            .map(|line| Some(line).filter(|line| !line.is_empty()))
            .map_err(Error::from)
    }};

    (@msg $name:expr, $opt:expr, $ty:expr) => {{
        if $opt {
            format!("{}{} (optional, {}) ", $crate::PROMPT, $name, $ty)
        } else {
            format!("{}{} (required, {}) ", $crate::PROMPT, $name, $ty)
        }
    }};
}

/// What to do with one answer to a field prompt
#[derive(Debug, Clone, PartialEq, Eq)]
enum Answer {
    Accept(Value),
    Skip,
    Retry(String),
    Cancel,
}

fn answer(input: Option<String>, ty: Type, is_optional: bool) -> Answer {
    match input {
        Some(input) => match Value::from_str(&input, ty) {
            Ok(value) => Answer::Accept(value),
            Err(e) => Answer::Retry(format!("Invalid value received, {}", e)),
        },

        None if is_optional => Answer::Skip,

        // Hidden prompts can't be interrupted with CTRL-C once the request
        // spinner has taken over SIGINT, an empty answer is the way out
        None if ty == Type::Secret => Answer::Cancel,

        None => Answer::Retry("Field is required, cannot be empty!".into()),
    }
}

/// Asks for every field in order, re-asking until the value converts
pub(crate) fn build_prototype(
    rl: &mut Editor<()>,
    fields: Vec<Field<'static>>,
) -> Result<Vec<(&'static str, Value)>, Error> {
    println!("Press CTRL-D to leave a field as 'empty', leave a hidden field empty to cancel");
    let mut prototype = Vec::new();

    for field in fields {
        let is_optional = field.is_optional();
        let (name, ty) = field.into_tuple();

        loop {
            let input: Option<String> = match ty {
                Type::Secret => field!(@secret name, is_optional)?,
                _ => field!(rl, name, is_optional, ty)?,
            };

            match answer(input, ty, is_optional) {
                Answer::Accept(value) => {
                    prototype.push((name, value));
                    break;
                }

                Answer::Skip => break,

                Answer::Retry(reason) => {
                    log::error!("{}: {}", name, reason);
                }

                Answer::Cancel => return Err(anyhow::anyhow!("Cancelled")),
            }
        }
    }

    Ok(prototype)
}
