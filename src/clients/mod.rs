pub mod calendar;
pub mod dialogflow;
