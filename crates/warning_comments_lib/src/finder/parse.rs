use nom::{
    bytes::complete as bytes, character::complete as character, combinator, multi, sequence,
    IResult, Parser,
};

/// Eat one non-empty path and its line ending.
pub fn file_line(i: &str) -> IResult<&str, &str> {
    let (i, path) = bytes::take_till1(|c| c == '\r' || c == '\n')(i)?;
    let (i, _) = combinator::opt(character::line_ending).parse(i)?;
    Ok((i, path))
}

/// Parse the output of `rg --files`, one path per line.
pub fn parse_file_list(i: &str) -> IResult<&str, Vec<&str>> {
    let (i, files) = multi::many0(sequence::preceded(
        multi::many0(character::line_ending),
        file_line,
    ))
    .parse(i)?;
    let (i, _) = multi::many0(character::line_ending).parse(i)?;
    let (i, _) = combinator::eof(i)?;
    Ok((i, files))
}
