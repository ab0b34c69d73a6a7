// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use nom::bytes::complete::{tag, take_till1, take_while};
use nom::character::complete::{char, digit1};
use nom::combinator::map_res;
use nom::{sequence::delimited, IResult};

/// A single quoted, non-empty string
pub(crate) fn parse_string(input: &str) -> IResult<&str, &str> {
    delimited(char('\''), take_till1(|c: char| c == '\''), char('\''))(input)
}

pub(crate) fn parse_number(input: &str) -> IResult<&str, i64> {
    map_res(digit1, |s: &str| s.parse::<i64>())(input)
}

pub(crate) fn parse_separator(input: &str) -> IResult<&str, &str> {
    delimited(
        take_while(|c: char| c == ' '),
        tag(","),
        take_while(|c: char| c == ' '),
    )(input)
}
