//! 线条图标 (Lucide)
//!
//! 使用方式：`<Heart attr:class="h-4 w-4" />`，属性透传到根 `<svg>`。

use leptos::prelude::*;

macro_rules! lucide_icon {
    ($name:ident, $($path:literal),+ $(,)?) => {
        #[component]
        pub fn $name() -> impl IntoView {
            view! {
                <svg
                    xmlns="http://www.w3.org/2000/svg"
                    viewBox="0 0 24 24"
                    fill="none"
                    stroke="currentColor"
                    stroke-width="2"
                    stroke-linecap="round"
                    stroke-linejoin="round"
                    aria-hidden="true"
                >
                    $(<path d=$path />)+
                </svg>
            }
        }
    };
}

lucide_icon!(
    Heart,
    "M19 14c1.49-1.46 3-3.21 3-5.5A5.5 5.5 0 0 0 16.5 3c-1.76 0-3 .5-4.5 2-1.5-1.5-2.74-2-4.5-2A5.5 5.5 0 0 0 2 8.5c0 2.3 1.5 4.05 3 5.5l7 7Z"
);
lucide_icon!(Check, "M20 6 9 17l-5-5");
lucide_icon!(X, "M18 6 6 18", "m6 6 12 12");
lucide_icon!(ArrowLeft, "m12 19-7-7 7-7", "M19 12H5");
lucide_icon!(ArrowRight, "M5 12h14", "m12 5 7 7-7 7");
lucide_icon!(
    LogOut,
    "M9 21H5a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2h4",
    "m16 17 5-5-5-5",
    "M21 12H9"
);
lucide_icon!(
    Lock,
    "M7 11V7a5 5 0 0 1 10 0v4",
    "M5 11h14a2 2 0 0 1 2 2v7a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2v-7a2 2 0 0 1 2-2Z"
);
lucide_icon!(
    Moon,
    "M12 3a6 6 0 0 0 9 9 9 9 0 1 1-9-9Z"
);
lucide_icon!(
    RefreshCw,
    "M3 12a9 9 0 0 1 9-9 9.75 9.75 0 0 1 6.74 2.74L21 8",
    "M21 3v5h-5",
    "M21 12a9 9 0 0 1-9 9 9.75 9.75 0 0 1-6.74-2.74L3 16",
    "M8 16H3v5"
);
