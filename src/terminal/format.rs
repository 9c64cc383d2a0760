use std::fmt;

use console::{style, StyledObject};

pub fn bold<D: fmt::Display>(msg: D) -> StyledObject<D> {
    style(msg).bold()
}

pub fn dim<D: fmt::Display>(msg: D) -> StyledObject<D> {
    style(msg).dim()
}
