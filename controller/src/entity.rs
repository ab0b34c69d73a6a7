// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use prettytable::{format::consts::FORMAT_NO_LINESEP, Cell, Row, Table};

pub trait Entity {
    type Id;

    fn get_id(&self) -> Self::Id;
    fn get_data(&self) -> Vec<(&'static str, String)> {
        Default::default()
    }
}

pub trait ToTable {
    fn to_table(&self) -> Table;
}

impl<I: ToString, E: Entity<Id = I>> ToTable for E {
    fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(Row::new(vec![
            Cell::new("id"),
            Cell::new(&self.get_id().to_string()),
        ]));

        for (key, val) in self.get_data() {
            table.add_row(Row::new(vec![Cell::new(key), Cell::new(&val)]));
        }

        table.set_format(*FORMAT_NO_LINESEP);
        table
    }
}

// One row per entity, columns taken from the first one
impl<I: ToString, E: Entity<Id = I>> ToTable for [E] {
    fn to_table(&self) -> Table {
        let mut table = Table::new();

        if let Some(first) = self.first() {
            let mut titles = vec![Cell::new("id")];
            titles.extend(first.get_data().into_iter().map(|(key, _)| Cell::new(key)));
            table.set_titles(Row::new(titles));
        }

        for entity in self {
            let mut cells = vec![Cell::new(&entity.get_id().to_string())];
            cells.extend(entity.get_data().iter().map(|(_, val)| Cell::new(val)));
            table.add_row(Row::new(cells));
        }

        table.set_format(*FORMAT_NO_LINESEP);
        table
    }
}
