use leptos::prelude::*;

/// 404 page rendered by the router fallback.
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<h1>"Page not found"</h1>
		<p>"The page you were looking for does not exist."</p>
	}
}
