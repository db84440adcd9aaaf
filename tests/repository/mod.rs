mod add_and_rm;
mod log_and_find;
mod status;
