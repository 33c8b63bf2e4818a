mod formatter;
mod golden;
