//! Numbered menu driver for the planner.
//!
//! Reads choices and location names line by line and writes every
//! user-facing message. The planner itself never prints.

use std::io::{BufRead, Write};
use std::str::FromStr;

use log::debug;

use crate::error::{Outcome, PlannerError, PlannerResult};
use crate::planner::CityPlanner;

const MENU: &str = "\
--- Smart City Route Planner ---
1. Add a new location
2. Remove a location
3. Add a road between locations
4. Remove a road
5. Display all connections
6. Display all locations (AVL Tree)
7. Traverse city using BFS
0. Exit";

/// Driver settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Suppress the menu and input prompts, e.g. when input is piped.
    pub quiet: bool,
}

/// A menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    AddLocation,
    RemoveLocation,
    AddRoad,
    RemoveRoad,
    DisplayConnections,
    DisplayLocations,
    Traverse,
    Exit,
}

impl FromStr for Command {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Command::AddLocation),
            "2" => Ok(Command::RemoveLocation),
            "3" => Ok(Command::AddRoad),
            "4" => Ok(Command::RemoveRoad),
            "5" => Ok(Command::DisplayConnections),
            "6" => Ok(Command::DisplayLocations),
            "7" => Ok(Command::Traverse),
            "0" => Ok(Command::Exit),
            other => Err(PlannerError::InvalidInput(other.to_owned())),
        }
    }
}

/// Input, output and settings of one interactive run.
pub struct Session<R, W> {
    input: R,
    output: W,
    options: Options,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, options: Options) -> Self {
        Self {
            input,
            output,
            options,
        }
    }

    /// Gives back the output, e.g. to inspect what was written.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs the menu loop until the user exits or the input ends.
    pub fn run(&mut self, planner: &mut CityPlanner) -> PlannerResult<()> {
        loop {
            if !self.options.quiet {
                writeln!(self.output, "\n{MENU}")?;
            }
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                debug!("input ended");
                return Ok(());
            };
            match choice.parse::<Command>() {
                Ok(command) => {
                    if !self.execute(command, planner)? {
                        return Ok(());
                    }
                }
                Err(err) => {
                    debug!("{err}");
                    writeln!(self.output, "Invalid option. Try again.")?;
                }
            }
        }
    }

    /// Executes one command. Returns false if the loop should stop.
    pub fn execute(&mut self, command: Command, planner: &mut CityPlanner) -> PlannerResult<bool> {
        let completed = match command {
            Command::AddLocation => self.cmd_add_location(planner)?,
            Command::RemoveLocation => self.cmd_remove_location(planner)?,
            Command::AddRoad => self.cmd_add_road(planner)?,
            Command::RemoveRoad => self.cmd_remove_road(planner)?,
            Command::DisplayConnections => self.cmd_display_connections(planner)?,
            Command::DisplayLocations => self.cmd_display_locations(planner)?,
            Command::Traverse => self.cmd_traverse(planner)?,
            Command::Exit => {
                writeln!(self.output, "Exiting... Goodbye!")?;
                false
            }
        };
        self.output.flush()?;
        Ok(completed)
    }

    fn cmd_add_location(&mut self, planner: &mut CityPlanner) -> PlannerResult<bool> {
        let Some(name) = self.prompt("Enter location name: ")? else {
            return Ok(false);
        };
        match planner.add_location(&name) {
            Outcome::AlreadyExists => writeln!(self.output, "Location already exists.")?,
            _ => writeln!(self.output, "Location added: {name}")?,
        }
        Ok(true)
    }

    fn cmd_remove_location(&mut self, planner: &mut CityPlanner) -> PlannerResult<bool> {
        let Some(name) = self.prompt("Enter location name to remove: ")? else {
            return Ok(false);
        };
        match planner.remove_location(&name) {
            Ok(_) => writeln!(self.output, "Location removed: {name}")?,
            Err(err) if err.is_not_found() => writeln!(self.output, "Location not found.")?,
            Err(err) => return Err(err),
        }
        Ok(true)
    }

    fn cmd_add_road(&mut self, planner: &mut CityPlanner) -> PlannerResult<bool> {
        let Some((src, dest)) = self.prompt_endpoints()? else {
            return Ok(false);
        };
        match planner.add_road(&src, &dest) {
            Ok(Outcome::AlreadyExists) => writeln!(self.output, "Road already exists.")?,
            Ok(_) => writeln!(self.output, "Road added between {src} and {dest}")?,
            Err(err) if err.is_not_found() => {
                writeln!(self.output, "Both locations must exist first.")?
            }
            Err(err) => return Err(err),
        }
        Ok(true)
    }

    fn cmd_remove_road(&mut self, planner: &mut CityPlanner) -> PlannerResult<bool> {
        let Some((src, dest)) = self.prompt_endpoints()? else {
            return Ok(false);
        };
        match planner.remove_road(&src, &dest) {
            Ok(_) => writeln!(self.output, "Road removed between {src} and {dest}")?,
            Err(err) if err.is_not_found() => writeln!(self.output, "Locations not found.")?,
            Err(err) => return Err(err),
        }
        Ok(true)
    }

    fn cmd_display_connections(&mut self, planner: &CityPlanner) -> PlannerResult<bool> {
        writeln!(self.output, "\n--- City Road Connections ---")?;
        for (name, neighbors) in planner.connections() {
            writeln!(self.output, "{name} -> [{}]", neighbors.join(", "))?;
        }
        Ok(true)
    }

    fn cmd_display_locations(&mut self, planner: &CityPlanner) -> PlannerResult<bool> {
        writeln!(self.output, "\n--- Locations (AVL Tree In-Order) ---")?;
        let names: Vec<&str> = planner.locations_sorted().map(String::as_str).collect();
        writeln!(self.output, "{}", names.join(" "))?;
        Ok(true)
    }

    fn cmd_traverse(&mut self, planner: &CityPlanner) -> PlannerResult<bool> {
        let Some(start) = self.prompt("Enter starting location for BFS: ")? else {
            return Ok(false);
        };
        match planner.bfs(&start) {
            Ok(order) => {
                let order: Vec<&str> = order.collect();
                writeln!(self.output, "\nBFS Traversal from {start}:")?;
                writeln!(self.output, "{}", order.join(" "))?;
            }
            Err(err) if err.is_not_found() => {
                writeln!(self.output, "Start location not found.")?
            }
            Err(err) => return Err(err),
        }
        Ok(true)
    }

    fn prompt_endpoints(&mut self) -> PlannerResult<Option<(String, String)>> {
        let Some(src) = self.prompt("Enter source: ")? else {
            return Ok(None);
        };
        let Some(dest) = self.prompt("Enter destination: ")? else {
            return Ok(None);
        };
        Ok(Some((src, dest)))
    }

    // Reads one line without its terminator. None at end of input.
    fn prompt(&mut self, text: &str) -> PlannerResult<Option<String>> {
        if !self.options.quiet {
            write!(self.output, "{text}")?;
            self.output.flush()?;
        }
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}
