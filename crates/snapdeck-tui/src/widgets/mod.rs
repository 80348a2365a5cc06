mod carousel;
mod popup;
mod status_bar;
mod stepper;

pub use carousel::CarouselWidget;
pub use popup::PopupWidget;
pub use status_bar::StatusBarWidget;
pub use stepper::StepperWidget;
