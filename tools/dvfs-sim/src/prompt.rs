use std::io::{self, BufRead, Write};
use std::str::FromStr;

use dslab_dvfs::task::{Task, TaskId, MAX_PRIORITY, MIN_PRIORITY};

const POSITIVE_INTEGER: &str = "Invalid input. Please enter a positive integer: ";

/// Reads the task batch from the interactive user input.
///
/// Invalid values are requested again until a valid one is entered.
pub fn read_tasks<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<Vec<Task>> {
    write!(output, "Enter number of tasks: ")?;
    let count: usize = read_value(input, output, |&n| n > 0, POSITIVE_INTEGER)?;

    let mut tasks = Vec::with_capacity(count);
    for pos in 0..count {
        let id = pos as TaskId + 1;
        writeln!(output, "\nTask {} parameters:", id)?;
        write!(output, "  Enter priority ({}-{}): ", MIN_PRIORITY, MAX_PRIORITY)?;
        let priority: u8 = read_value(
            input,
            output,
            |p| (MIN_PRIORITY..=MAX_PRIORITY).contains(p),
            "Invalid input. Please enter an integer between 1 and 10: ",
        )?;
        write!(output, "  Enter burst time (ms): ")?;
        let burst_time: u64 = read_value(input, output, |&b| b > 0, POSITIVE_INTEGER)?;
        write!(output, "  Enter deadline (ms): ")?;
        let deadline: u64 = read_value(input, output, |&d| d > 0, POSITIVE_INTEGER)?;

        let task = Task::new(id, priority, burst_time, deadline)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        tasks.push(task);
    }
    Ok(tasks)
}

fn read_value<T, R, W, F>(input: &mut R, output: &mut W, is_valid: F, retry_message: &str) -> io::Result<T>
where
    T: FromStr,
    R: BufRead,
    W: Write,
    F: Fn(&T) -> bool,
{
    loop {
        output.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input is closed"));
        }
        match line.trim().parse::<T>() {
            Ok(value) if is_valid(&value) => return Ok(value),
            _ => write!(output, "{}", retry_message)?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> (io::Result<Vec<Task>>, String) {
        let mut output = Vec::new();
        let result = read_tasks(&mut input.as_bytes(), &mut output);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_read_tasks() {
        let (result, output) = run("2\n5\n100\n1000\n3\n800\n1000\n");
        let tasks = result.unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0], Task::new(1, 5, 100, 1000).unwrap());
        assert_eq!(tasks[1], Task::new(2, 3, 800, 1000).unwrap());
        assert!(output.starts_with("Enter number of tasks: "));
        assert!(output.contains("Task 2 parameters:"));
        assert!(!output.contains("Invalid input"));
    }

    #[test]
    fn test_invalid_input_is_requested_again() {
        let (result, output) = run("zero\n-1\n0\n1\n11\n0\n7\nabc\n250\n0\n500\n");
        let tasks = result.unwrap();
        assert_eq!(tasks, vec![Task::new(1, 7, 250, 500).unwrap()]);
        assert_eq!(output.matches("Please enter a positive integer").count(), 5);
        assert_eq!(output.matches("Please enter an integer between 1 and 10").count(), 2);
    }

    #[test]
    fn test_unexpected_eof() {
        let (result, _) = run("1\n5\n");
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::UnexpectedEof);
    }
}
