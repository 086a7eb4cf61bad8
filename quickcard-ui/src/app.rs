//! App Root Component
//!
//! Routing and global providers. Anything the router cannot match lands
//! on the landing page.

use leptos::*;
use leptos_router::*;

use crate::components::{Header, Toast};
use crate::pages::{About, Contact, Dashboard, Landing, Login, PublicCard, Register};
use crate::state::provide_app_context;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Session, API client and locale for every page
    provide_app_context();

    view! {
        <Router>
            <div class="min-h-screen bg-gray-900 text-white flex flex-col">
                <Header />

                <main class="flex-1 container mx-auto px-4 py-8">
                    <Routes>
                        <Route path="/" view=Landing />
                        <Route path="/login" view=Login />
                        <Route path="/register" view=Register />
                        <Route path="/dashboard" view=Dashboard />
                        <Route path="/about" view=About />
                        <Route path="/contact" view=Contact />
                        <Route path="/:slug" view=PublicCard />
                        <Route path="/*any" view=Landing />
                    </Routes>
                </main>

                <Toast />
            </div>
        </Router>
    }
}
