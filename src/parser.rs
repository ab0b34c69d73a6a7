mod basics;

use app::Route;
use basics::{parse_number, parse_separator, parse_string};
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::char;
use nom::combinator::{map, map_res};
use nom::sequence::{delimited, preceded, tuple};
use nom::IResult;
use std::convert::TryFrom;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Statement {
    Goto(Route),
    Click(String),
    Press(String),
    Type(String, String),
    Select(String, String),
    Rate(u8),
    SignIn,
    Fill,
    Back,
    Reload,
    Logout,
}

/// `name(<args>)`
fn call<'a, O, F>(name: &'static str, args: F) -> impl Fn(&'a str) -> IResult<&'a str, O>
where
    F: Fn(&'a str) -> IResult<&'a str, O>,
{
    preceded(tag(name), delimited(char('('), args, char(')')))
}

fn parse_goto(input: &str) -> IResult<&str, Statement> {
    alt((
        map(call("movie", parse_number), |id| {
            Statement::Goto(Route::MovieDetail(id))
        }),
        map_res(call("goto", parse_string), |path: &str| {
            Route::from_path(path).map(Statement::Goto)
        }),
        map(tag("home"), |_| Statement::Goto(Route::Home)),
        map(tag("movies"), |_| Statement::Goto(Route::AllMovies)),
        map(tag("login"), |_| Statement::Goto(Route::Login)),
        map(tag("ratings"), |_| Statement::Goto(Route::YourRatings)),
    ))(input)
}

fn parse_interaction(input: &str) -> IResult<&str, Statement> {
    alt((
        map(call("click", parse_string), |name: &str| {
            Statement::Click(name.into())
        }),
        map(call("press", parse_string), |name: &str| {
            Statement::Press(name.into())
        }),
        map(
            call("type", tuple((parse_string, parse_separator, parse_string))),
            |(label, _, text): (&str, &str, &str)| Statement::Type(label.into(), text.into()),
        ),
        map(
            call(
                "select",
                tuple((parse_string, parse_separator, parse_string)),
            ),
            |(label, _, value): (&str, &str, &str)| Statement::Select(label.into(), value.into()),
        ),
        map_res(call("rate", parse_number), |score| {
            u8::try_from(score).map(Statement::Rate)
        }),
    ))(input)
}

fn parse_keyword(input: &str) -> IResult<&str, Statement> {
    alt((
        map(tag("signin"), |_| Statement::SignIn),
        map(tag("fill"), |_| Statement::Fill),
        map(tag("back"), |_| Statement::Back),
        map(tag("reload"), |_| Statement::Reload),
        map(tag("logout"), |_| Statement::Logout),
    ))(input)
}

fn parse_statement(input: &str) -> IResult<&str, Statement> {
    alt((parse_goto, parse_interaction, parse_keyword))(input)
}

pub fn parse_line(input: &str) -> Option<Statement> {
    let input = input.trim();
    let (rest, statement) = parse_statement(input).ok()?;

    if rest.is_empty() {
        Some(statement)
    } else {
        None
    }
}
