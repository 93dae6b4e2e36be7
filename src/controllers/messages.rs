pub const BEGIN: &str =
    "Please define movie title and seating map in [Title] [Row] [SeatsPerRow] format:";
pub const INVALID_SETUP: &str = "Invalid movie title or rows or seats per row. Please try again.";

pub const SELECT_PROMPT: &str = "Please enter your selection:";
pub const INVALID_MENU_SELECTION: &str = "Invalid menu selection. Please try again.";
pub const GOODBYE: &str = "Thank you for using GIC Cinemas system. Bye!";

pub const INPUT_NUMBER_OF_TICKETS: &str =
    "Enter number of tickets to book, or enter blank to go back to main menu:";
pub const INVALID_NUMBER_OF_TICKETS: &str = "Invalid number of tickets. Please try again.";
pub const INPUT_SEATING_POSITION: &str =
    "Enter blank to accept seat selection, or enter new seating position:";
pub const INVALID_SEATING_POSITION: &str = "Invalid seating position. Please try again.";

pub const INPUT_BOOKING_ID: &str = "Enter booking id, or enter blank to go back to main menu:";
pub const INVALID_BOOKING_ID: &str = "Invalid booking id. Please try again.";

pub fn welcome(movie_title: &str, seats_available: usize) -> String {
    format!(
        "Welcome to GIC Cinemas\n\
         [1] Book tickets for {movie_title} ({seats_available} seats available)\n\
         [2] Check bookings\n\
         [3] Exit"
    )
}

pub fn only_available(available: usize) -> String {
    format!("Sorry, there are only {available} seats available.")
}

pub fn successfully_reserved(count: usize, movie_title: &str) -> String {
    format!("Successfully reserved {count} {movie_title} tickets.")
}

pub fn booking_id(id: &str) -> String {
    format!("Booking id: {id}")
}

pub fn booking_confirmed(id: &str) -> String {
    format!("Booking id: {id} confirmed.")
}

pub fn booking_not_found(id: &str) -> String {
    format!("Booking id {id} does not exist. Please try again.")
}
